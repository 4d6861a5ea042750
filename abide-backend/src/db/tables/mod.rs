//! Table modules - each extends Database with `impl Database` blocks

mod bookmarks; // bookmarks
mod entries;   // entries
mod users;     // users
