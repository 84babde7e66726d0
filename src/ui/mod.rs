/// UI module exports
pub mod app;
mod components;
mod folder_panel;
mod memo_card;
mod memo_filter;
mod memo_form;
mod memo_list;
mod saved_images;
mod store_context;
