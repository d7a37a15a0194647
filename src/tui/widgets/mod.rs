pub mod agenda;
pub mod balance;
pub mod calculator;
pub mod habits;
pub mod header;
pub mod next_up;
pub mod statusbar;
pub mod stopwatch;
pub mod tasbeeh;
pub mod word_clock;
