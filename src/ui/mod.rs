pub mod ascii;
pub mod display_manager;
pub mod palette;
pub mod table_printer;
pub mod width_util;
