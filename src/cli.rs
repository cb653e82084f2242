use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Normalize multi-valued permission columns into lookup tables and a connector schema",
    long_about = None
)]
pub struct Args {
    /// Input delimited file (encoding and dialect are detected automatically)
    pub input: PathBuf,
    /// Prefix for output files (<prefix>_<column>.csv, <prefix>_main.csv, <prefix>_schema.groovy)
    pub output_prefix: String,
    /// Names of the columns holding multi-valued permission data
    #[arg(required = true)]
    pub permission_columns: Vec<String>,
    /// Character encoding of the input file (overrides detection)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}
