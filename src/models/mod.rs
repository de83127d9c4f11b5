pub mod notice;
pub mod point;
pub mod selection;
pub mod view;
