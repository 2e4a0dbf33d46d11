pub mod speak_button;
pub mod transcript_list;

pub use speak_button::SpeakButton;
pub use transcript_list::TranscriptList;
