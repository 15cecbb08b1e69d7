use exprfp::{
    AlgebraicEqv, EqvParamsBuilder, EqvRelation as _, EquivalenceChecker, Expr, ExprSystem, Mode,
    StructuralEqv,
};

mod common;

fn rewrites() -> ExprSystem {
    let (a, x, y) = (Expr::param(10), Expr::var(20), Expr::var(30));
    let mut system = ExprSystem::new();
    let (factored, expanded) = common::distributed_pair();
    system.push(factored);
    system.push(x.clone() * a.clone() + y.clone() * a.clone());
    system.push(a.clone() * (x.clone() - y.clone()));
    system.push(expanded);
    system.push((x.clone() * x.clone() - y.clone() * y.clone()) / (x.clone() + y.clone()));
    system.push(x - y);
    system
}

#[test]
fn rewrites_group_algebraically() {
    common::setup();
    let system = rewrites();
    let classes: Vec<Vec<usize>> = system
        .classes(Mode::Algebraic)
        .unwrap()
        .into_iter()
        .map(|class| class.iter().map(|id| id.index()).collect())
        .collect();
    assert_eq!(classes, vec![vec![0, 1, 3], vec![2], vec![4, 5]]);
}

#[test]
fn hardened_checker_agrees_with_classes() {
    common::setup();
    let system = rewrites();
    let checker = EquivalenceChecker::new(EqvParamsBuilder::new().trials(4).seed(1));
    for class in system.classes(Mode::Algebraic).unwrap() {
        let first = &system[class[0]];
        for id in &class[1..] {
            let member = &system[*id];
            assert!(checker.check(first, member, Mode::Algebraic).unwrap());
        }
    }
}

#[test]
fn hardened_checker_is_reproducible() {
    common::setup();
    let params = EqvParamsBuilder::new().trials(3).seed(99).build();
    let lhs = Expr::var(1) + Expr::var(3);
    let rhs = Expr::var(2) + Expr::var(2);
    let first = EquivalenceChecker::new(params.clone()).check(&lhs, &rhs, Mode::Algebraic);
    let second = EquivalenceChecker::new(params).check(&lhs, &rhs, Mode::Algebraic);
    assert_eq!(first, Ok(false));
    assert_eq!(first, second);
}

#[test]
fn relations_over_whole_systems() {
    common::setup();
    let lhs: Vec<Expr> = rewrites().iter().map(|(_, e)| e.clone()).collect();
    let rhs: Vec<Expr> = lhs.iter().rev().cloned().collect();
    assert!(!AlgebraicEqv::equivalent(&lhs, &rhs).unwrap());
    assert!(AlgebraicEqv::equivalent(&lhs, &lhs.clone()).unwrap());
    let (first, third) = (lhs[..1].to_vec(), rhs[2..3].to_vec());
    assert!(StructuralEqv::equivalent(&first, &third).unwrap());
}

#[test]
fn lookup_by_rewritten_form() {
    common::setup();
    let system = rewrites();
    let probe = Expr::var(30) * Expr::param(10) + Expr::var(20) * Expr::param(10);
    let found = system.find_equivalent(&probe, Mode::Algebraic).unwrap();
    assert_eq!(found.map(|id| id.index()), Some(0));
}
