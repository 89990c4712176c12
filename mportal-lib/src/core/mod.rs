pub mod mentor;
