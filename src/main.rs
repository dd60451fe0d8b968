use env_logger::{Builder, Env};

mod runtime;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    runtime::run()
}
