pub mod calculator;
pub mod converter;
pub mod interpreter;
pub mod quiz;
