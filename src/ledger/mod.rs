pub mod history;
pub mod sorted_view;
