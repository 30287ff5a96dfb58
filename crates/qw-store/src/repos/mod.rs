//! `QuizDb` implementations of the gateway traits.

mod catalog;
mod question;
