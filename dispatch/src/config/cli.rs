use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, help = "Directory holding the reference CSV fixtures", default_value = "data/fixtures")]
    data_dir: String,

    #[arg(short = 'T', long, help = "Horizon length in periods", default_value_t = 24)]
    horizon_periods: usize,

    #[arg(long, help = "Period duration in hours", default_value_t = 1.0)]
    period_duration_hours: f64,

    #[arg(long, help = "Wall-clock solve time limit in seconds", default_value_t = 300.0)]
    time_limit_s: f64,

    #[arg(long, help = "Relative MIP gap tolerance", default_value_t = 1e-4)]
    mip_gap: f64,

    #[arg(long, help = "Disable reservoir/pumped-storage spillage variables", default_value_t = false)]
    no_spill: bool,

    #[arg(long, help = "Disable the deficit (unserved energy) variable family", default_value_t = false)]
    no_deficit: bool,

    #[arg(long, help = "Enable hierarchical timing collection and report", default_value_t = false)]
    enable_timing: bool,

    #[arg(long, help = "Enable debug-level logging", default_value_t = false)]
    debug_logging: bool,

    #[arg(long, help = "Run every scenario CSV set found under data_dir in parallel", default_value_t = false)]
    batch: bool,

    #[arg(long, help = "Write the solution summary as JSON instead of a human-readable table", default_value_t = false)]
    json: bool,
}

impl Args {
    pub fn data_dir(&self) -> &str {
        &self.data_dir
    }

    pub fn horizon_periods(&self) -> usize {
        self.horizon_periods
    }

    pub fn period_duration_hours(&self) -> f64 {
        self.period_duration_hours
    }

    pub fn time_limit_s(&self) -> f64 {
        self.time_limit_s
    }

    pub fn mip_gap(&self) -> f64 {
        self.mip_gap
    }

    pub fn no_spill(&self) -> bool {
        self.no_spill
    }

    pub fn no_deficit(&self) -> bool {
        self.no_deficit
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    pub fn batch(&self) -> bool {
        self.batch
    }

    pub fn json(&self) -> bool {
        self.json
    }
}
