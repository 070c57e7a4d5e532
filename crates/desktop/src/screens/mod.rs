pub mod auth_screen;
pub mod settings_screen;
pub mod transaction_screen;
