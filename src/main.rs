fn main() {
    rpt::app::cli::run();
}
