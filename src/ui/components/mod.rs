pub mod answer_box;
pub mod mode_tabs;
pub mod popup;
pub mod progress_bar;
pub mod verb_card;
