pub mod dashboard;
pub mod historical;
pub mod seeder;
