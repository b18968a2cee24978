mod cli;
mod demo;
mod infra;

use pet_shelter::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
