use session::app;

fn main() -> anyhow::Result<()> {
    app::run()
}
