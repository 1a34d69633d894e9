mod common;
mod rent;
mod scoring;
