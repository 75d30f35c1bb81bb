use pixie_demo::KeyBindings;

fn main() -> anyhow::Result<()> {
    pixie_demo::run(KeyBindings::wasd())
}
