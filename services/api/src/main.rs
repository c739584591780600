use smartqueue_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("smartqueue error: {err}");
        std::process::exit(1);
    }
}
