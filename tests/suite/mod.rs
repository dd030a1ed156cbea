mod mode;
mod recording;
mod session;
