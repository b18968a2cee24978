mod common;
mod ids;
