mod common;
mod import;
mod registry;
mod window;
