//! Route inspector: resolves paths against the storefront route table.
//!
//! With `--load`, lazy views are fetched from `ASSET_BASE_URL` as a browser
//! would on first visit.

use std::process::ExitCode;

use clap::Parser;
use front_page::context::AppContext;

#[derive(Parser, Debug)]
#[command(name = "front-page", about = "Resolve storefront paths against the route table")]
struct Cli {
    /// Navigate to each path, loading lazy views.
    #[arg(long)]
    load: bool,
    /// Browser locations to resolve, e.g. `/goods_detail/42`.
    #[arg(required = true)]
    paths: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let ctx = match AppContext::from_env() {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!(error = %e, "failed to build app context");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    for path in &cli.paths {
        if cli.load {
            match ctx.router.navigate_location(path).await {
                Ok(nav) => println!("{path} -> {} ({}) {:?}", nav.name, nav.view(), nav.params),
                Err(e) => {
                    tracing::warn!(%path, error = %e, "navigation failed");
                    failed = true;
                }
            }
        } else {
            match ctx.router.resolve_location(path) {
                Ok(matched) => {
                    let loading = if matched.route.component().is_lazy() { "lazy" } else { "eager" };
                    println!("{path} -> {} ({}, {loading}) {:?}", matched.name(), matched.view(), matched.params);
                }
                Err(e) => {
                    tracing::warn!(%path, error = %e, "no route");
                    failed = true;
                }
            }
        }
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
