pub mod spider;
