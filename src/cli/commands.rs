use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "key-tester")]
#[command(version, about = "Concurrent batch validation of API keys against a GPT-Load gateway", long_about = None)]
pub struct Cli {
    /// Base address of the gateway (e.g. http://192.168.1.99:3001);
    /// may also come from the [gateway] section of the config file
    #[arg(long)]
    pub url: Option<String>,

    /// Gateway auth key (falls back to the GPT_LOAD_AUTH_KEY environment variable)
    #[arg(long)]
    pub auth_key: Option<String>,

    /// Maximum number of concurrent validation calls (default: 50)
    #[arg(long)]
    pub concurrent: Option<usize>,

    /// Output file for results (default: key_test_results_<timestamp>.<format>)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Export format (csv, json)
    #[arg(long, default_value = "csv")]
    pub format: String,

    /// Test keys from a local JSON file instead of fetching the gateway listing
    #[arg(long)]
    pub keys_file: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
