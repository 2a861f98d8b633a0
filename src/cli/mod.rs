mod commands;
mod handlers;

pub use commands::{Cli, Commands, ServeArgs, SetArgs};
pub use handlers::{
    handle_delete, handle_get, handle_init, handle_list, handle_serve, handle_set,
};
