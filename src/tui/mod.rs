pub mod debounce;
pub mod event_loop;
pub mod state;
pub mod state_render;
pub mod view;
