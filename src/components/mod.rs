pub mod iograph;
