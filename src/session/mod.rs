pub mod controller;
pub mod state;
pub mod transcript;
pub mod turn;

pub use controller::SessionController;
pub use state::{ListeningState, Session};
pub use transcript::Transcript;
pub use turn::{Speaker, Turn};
