//! Bouncing-ball animation. Demonstrates the draw/flush loop and
//! cooperative shutdown: the loop exits within one frame of the browser
//! disconnecting.

use std::time::Duration;

use clap::Parser;

use canvas::{Color, Context, Options};

#[derive(Parser, Debug)]
#[command(name = "bounce", about = "Remote canvas bouncing-ball demo")]
struct Args {
    #[arg(long, env = "CANVAS_ADDR", default_value = "127.0.0.1:8080")]
    addr: String,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[tokio::main]
async fn main() -> Result<(), canvas::ServeError> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let options = Options::default()
        .with_title("bounce")
        .with_size(args.width, args.height)
        .with_background(Color::rgb(24, 24, 32));

    tracing::info!(addr = %args.addr, "open this address in a browser");
    canvas::serve(&*args.addr, options, run).await
}

async fn run(mut ctx: Context) {
    let quit = ctx.quit();
    let mut interval = tokio::time::interval(Duration::from_millis(16));

    let (mut x, mut y) = (60.0, 60.0);
    let (mut dx, mut dy) = (3.2, 2.1);
    let radius = 24.0;

    loop {
        tokio::select! {
            () = quit.cancelled() => break,
            _ = interval.tick() => {}
        }

        let (width, height) = ctx.size();
        let (width, height) = (f64::from(width), f64::from(height));
        x += dx;
        y += dy;
        if x - radius < 0.0 || x + radius > width {
            dx = -dx;
        }
        if y - radius < 0.0 || y + radius > height {
            dy = -dy;
        }

        ctx.set_fill_color(Color::rgb(24, 24, 32));
        ctx.fill_rect(0.0, 0.0, width, height);
        ctx.begin_path();
        ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU, false);
        ctx.set_fill_color(Color::rgb(255, 120, 40));
        ctx.fill();
        if ctx.flush().await.is_err() {
            break;
        }
    }
    tracing::info!("bounce session ended");
}
