use std::env;
use std::process::ExitCode;

use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use vend_eng::MachineService;
use vend_eng::csv::{read_events, write_transcript};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let path = env::args().nth(1).expect("usage: vend-eng <events.csv>");

    if !path.ends_with(".csv") {
        warn!(path, "input file seems to not be a csv file");
    }

    let mut service = MachineService::new();
    let (event_sender, event_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in read_events(&path) {
            match result {
                Ok(event) => {
                    event_sender.send(event).await.unwrap();
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    let mut stream = ReceiverStream::new(event_receiver);
    let mut transcript = Vec::new();
    while let Some(event) = stream.next().await {
        match service.handle(event) {
            Ok(info) => transcript.push(info),
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        }
    }

    write_transcript(transcript);
    ExitCode::SUCCESS
}
