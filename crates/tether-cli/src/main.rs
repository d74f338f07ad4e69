use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tether_core::binding::{
    BindingMatch, BlobArgumentBindingProvider, FunctionBindingContext,
    OutTextArgumentBindingProvider,
};
use tether_core::config::HostConfig;
use tether_core::domain::{AccessMode, BlobPath, BlobRef, ParameterDescriptor, ValueType};
use tether_core::impls::TracingWatcher;
use tether_core::observability::BinderStatus;
use tether_core::ports::{BlobClient, IdGenerator, SystemClock, UlidGenerator};

/// Write text to a blob the way a function's `out` text parameter would.
///
/// Storage is chosen by TETHER_STORAGE_BACKEND (memory | local) and
/// TETHER_STORAGE_ROOT.
#[derive(Parser)]
#[command(name = "tether", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bind an out text parameter to <BLOB> and assign <TEXT> to it
    Write {
        /// Target blob as container/name
        blob: BlobPath,
        text: String,
        /// Requested access mode (only `write` is accepted)
        #[arg(long)]
        access: Option<AccessMode>,
        /// Treat the target as a page blob
        #[arg(long)]
        page: bool,
        /// Parameter name used in logs
        #[arg(long, default_value = "output")]
        parameter: String,
    },
    /// Print the invoke string of <BLOB> and whether it exists
    Describe { blob: BlobPath },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let client = HostConfig::from_env().create_client();

    match cli.command {
        Command::Write {
            blob,
            text,
            access,
            page,
            parameter,
        } => {
            let target = if page {
                BlobRef::page(blob)
            } else {
                BlobRef::block(blob)
            };
            write(client, target, text, access, parameter).await
        }
        Command::Describe { blob } => {
            let exists = client.exists(&BlobRef::block(blob.clone())).await?;
            println!("{blob} (exists: {exists})");
            Ok(())
        }
    }
}

async fn write(
    client: Arc<dyn BlobClient>,
    target: BlobRef,
    text: String,
    access: Option<AccessMode>,
    parameter: String,
) -> anyhow::Result<()> {
    let provider = OutTextArgumentBindingProvider::new(client);
    let descriptor = ParameterDescriptor::out(parameter, ValueType::Text);

    let binding = match provider.try_create(&descriptor, access)? {
        BindingMatch::Matched(binding) => binding,
        BindingMatch::NotApplicable => {
            bail!("parameter '{}' is not an out text parameter", descriptor.name)
        }
    };

    let ids = UlidGenerator::new(SystemClock);
    let context = FunctionBindingContext::new(ids.generate_instance_id(), Arc::new(TracingWatcher));

    let mut binder = binding.bind(&target, &context).await?;
    println!("bound {} to {}", descriptor.name, binder.to_invoke_string());

    binder.set_value(serde_json::Value::String(text)).await?;

    let status = BinderStatus::of(binder.as_ref());
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
