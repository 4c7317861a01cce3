pub mod extract;
pub mod images;
pub mod interactive;
pub mod output;
pub mod pages;
pub mod restore;
pub mod text;
