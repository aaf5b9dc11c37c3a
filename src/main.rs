mod app;
mod catalog;
mod config;
mod lyrics;
mod playback;
mod runtime;
mod ui;
mod visualizer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
