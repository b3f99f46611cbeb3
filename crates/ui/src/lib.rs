//! Presentation models for the interview front end: plain data and text,
//! no terminal or widget code.

pub mod vm;
