/// JSON loading of concentration maps and simulation result documents
pub mod load_from_file;
pub mod logger;
