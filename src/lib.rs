pub mod cache;
pub mod core;
pub mod glossary;
pub mod gui;
pub mod i18n;
pub mod parser;
pub mod quiz;
pub mod remote;
pub mod sync;
