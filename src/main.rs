fn main() {
    packforge::run_cli();
}
