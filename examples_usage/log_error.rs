use tracing::{error, info};
use tracing_stackdriver_format::{init_tracing, install_panic_hook, Formatter};

fn main() {
    let formatter = Formatter::builder()
        .service("test-service")
        .version("v0.1.0")
        .build();

    install_panic_hook(formatter.clone());
    if let Err(e) = init_tracing(formatter) {
        eprintln!("{}", e);
        return;
    }

    info!("application up and running");

    if let Err(err) = "text".parse::<i64>() {
        error!(error = %err, "X-Subject-Id" = "user-42", "unable to parse integer");
    }
}
