pub mod answer;
pub mod attempt;
pub mod daily_quiz;
pub mod question;
pub mod score;
pub mod session;
pub mod template;
