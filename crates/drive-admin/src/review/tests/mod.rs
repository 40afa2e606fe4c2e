mod common;
mod registrations;
