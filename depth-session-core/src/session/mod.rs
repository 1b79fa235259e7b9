pub mod acquisition;
pub mod controller;
pub mod events;
pub mod recording;
pub mod registry;
