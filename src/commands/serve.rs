use crate::cli::ServeCli;
use crate::services::{network, server};
use anyhow::Context;
use std::io::Write;
use std::net::SocketAddr;
use tracing::info;

pub async fn handle_serve(cli: &ServeCli) -> anyhow::Result<()> {
    let root = cli
        .dir
        .canonicalize()
        .with_context(|| format!("cannot serve {}", cli.dir.display()))?;
    let (bound, server) = server::bind(SocketAddr::new(cli.bind, cli.port), root.clone())?;
    info!(addr = %bound, root = %root.display(), "dev server listening");

    print_banner(&mut std::io::stdout(), bound.port(), &network::lan_ip())?;

    tokio::select! {
        _ = server => {}
        Ok(()) = tokio::signal::ctrl_c() => {
            info!("interrupted, stopping dev server");
        }
    }
    Ok(())
}

pub fn print_banner(out: &mut impl Write, port: u16, lan_ip: &str) -> anyhow::Result<()> {
    writeln!(out, "Server running at http://localhost:{}/", port)?;
    writeln!(out, "Access on mobile: http://{}:{}/", lan_ip, port)?;
    writeln!(out, "Press Ctrl+C to stop")?;
    writeln!(out, "\nNote: For camera access on mobile, you may need HTTPS.")?;
    writeln!(out, "Consider using ngrok or similar for remote testing.")?;
    out.flush()?;
    Ok(())
}
