fn main() {
    rawconv_bin::main();
}
