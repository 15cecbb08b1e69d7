use exprfp::Expr;
use log::LevelFilter;
use simplelog::{Config, TestLogger};

pub fn setup() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

/// `a * (x + y)` and `a * x + a * y` with `a = par10`, `x = var20`, `y = var30`.
#[allow(dead_code)]
pub fn distributed_pair() -> (Expr, Expr) {
    let (a, x, y) = (Expr::param(10), Expr::var(20), Expr::var(30));
    let factored = a.clone() * (x.clone() + y.clone());
    let expanded = a.clone() * x + a * y;
    (factored, expanded)
}
