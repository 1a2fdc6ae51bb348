pub mod audio;
pub mod export;
pub mod health;
pub mod records;
