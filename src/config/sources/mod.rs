pub mod explicit_file;
