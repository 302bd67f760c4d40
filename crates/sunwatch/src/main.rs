use anyhow::Context;

mod response;
mod time;

use crate::response::{ResponseHandler, ResponseStatus, SunTimes};

/// A captured response of the sunrise-sunset service, replayed when no dump
/// file is given on the command line.
const SAMPLE_RESPONSE: &[u8] = b"HTTP/1.0 200 OK\r\n\
Server: nginx\r\n\
Content-Type: application/json\r\n\
Connection: close\r\n\
\r\n\
{\"results\":{\"sunrise\":\"7:27:02 AM\",\"sunset\":\"5:05:55 PM\",\
\"solar_noon\":\"12:16:28 PM\",\"day_length\":\"09:38:53\",\
\"civil_twilight_begin\":\"7:02:36 AM\",\"civil_twilight_end\":\"5:30:20 PM\",\
\"nautical_twilight_begin\":\"6:33:24 AM\",\"nautical_twilight_end\":\"5:59:33 PM\",\
\"astronomical_twilight_begin\":\"6:04:48 AM\",\"astronomical_twilight_end\":\"6:28:09 PM\"},\
\"status\":\"OK\"}";

const DEFAULT_FRAGMENT_SIZE: usize = 64;

/// Replays an HTTP response dump through the extraction handler the way a
/// network stack would: in fragments of a caller-chosen size.
///
/// Usage: `sunwatch [response-dump-file] [fragment-size]`
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let response = match args.next() {
        Some(path) => std::fs::read(&path).with_context(|| format!("reading response dump {path}"))?,
        None => SAMPLE_RESPONSE.to_vec(),
    };
    let fragment_size = match args.next() {
        Some(size) => size.parse().context("fragment size must be a positive number")?,
        None => DEFAULT_FRAGMENT_SIZE,
    };
    anyhow::ensure!(fragment_size > 0, "fragment size must be a positive number");

    let mut handler = ResponseHandler::new();
    for fragment in response.chunks(fragment_size) {
        tracing::debug!(bytes = fragment.len(), "fragment received");
        match handler.feed(fragment) {
            ResponseStatus::InProgress => {}
            ResponseStatus::Complete(times) => {
                report(&times);
                return Ok(());
            }
            ResponseStatus::Failed => anyhow::bail!("the response does not look like sunrise-sunset data"),
        }
    }
    anyhow::bail!("the response ended before all times were extracted")
}

fn report(times: &SunTimes) {
    tracing::info!("all times extracted");
    println!("twilight begin: {}", times.twilight_begin);
    println!("       sunrise: {}", times.sunrise);
    println!("        sunset: {}", times.sunset);
    println!("  twilight end: {}", times.twilight_end);
}
