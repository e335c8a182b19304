mod common;
mod navigation;
mod submission;
