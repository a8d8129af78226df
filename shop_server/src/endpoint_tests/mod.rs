mod gate;
mod helpers;
mod mocks;
