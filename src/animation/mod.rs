pub(crate) mod action;
pub(crate) mod clock;
pub(crate) mod scheduler;
pub(crate) mod script;
pub(crate) mod sequencer;
pub(crate) mod stepper;
pub(crate) mod transition;
