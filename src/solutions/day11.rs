use anyhow::{bail, ensure, Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    Old,
    Value(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add(Operand),
    Multiply(Operand),
}

impl Operation {
    fn apply(self, old: u64) -> Result<u64> {
        let resolve = |operand: Operand| match operand {
            Operand::Old => old,
            Operand::Value(value) => value,
        };
        let new = match self {
            Operation::Add(operand) => old.checked_add(resolve(operand)),
            Operation::Multiply(operand) => old.checked_mul(resolve(operand)),
        };
        new.with_context(|| format!("worry level overflow applying {:?} to {}", self, old))
    }
}

#[derive(Debug, Clone, Copy)]
enum Relief {
    /// Worry levels drop to a third after each inspection.
    DivideByThree,
    /// No relief; levels are reduced modulo a common multiple of all divisors.
    Modulo(u64),
}

#[derive(Debug, Clone)]
struct Monkey {
    items: Vec<u64>,
    operation: Operation,
    divisor: u64,
    if_true: usize,
    if_false: usize,
}

fn field<'a>(lines: &mut impl Iterator<Item = &'a str>, prefix: &str) -> Result<&'a str> {
    let line = lines
        .next()
        .with_context(|| format!("missing {:?} line", prefix.trim()))?
        .trim();
    line.strip_prefix(prefix)
        .with_context(|| format!("expected {:?}, found {:?}", prefix, line))
}

fn parse_monkey(index: usize, block: &str) -> Result<Monkey> {
    let mut lines = block.lines();

    let header = field(&mut lines, "Monkey ")?;
    ensure!(header == format!("{}:", index), "unexpected header {:?}", header);

    let items = field(&mut lines, "Starting items:")?
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse::<u64>().with_context(|| format!("invalid item {:?}", item)))
        .collect::<Result<Vec<_>>>()?;

    let operation = field(&mut lines, "Operation: new = old ")?;
    let (operator, operand) = operation
        .split_once(' ')
        .with_context(|| format!("malformed operation {:?}", operation))?;
    let operand = match operand {
        "old" => Operand::Old,
        value => Operand::Value(value.parse()?),
    };
    let operation = match operator {
        "+" => Operation::Add(operand),
        "*" => Operation::Multiply(operand),
        _ => bail!("unknown operator {:?}", operator),
    };

    let divisor: u64 = field(&mut lines, "Test: divisible by ")?.parse()?;
    ensure!(divisor > 0, "divisor must be positive");
    let if_true = field(&mut lines, "If true: throw to monkey ")?.parse()?;
    let if_false = field(&mut lines, "If false: throw to monkey ")?.parse()?;

    Ok(Monkey {
        items,
        operation,
        divisor,
        if_true,
        if_false,
    })
}

fn parse_monkeys(input: &str) -> Result<Vec<Monkey>> {
    let monkeys = input
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .enumerate()
        .map(|(i, block)| parse_monkey(i, block).with_context(|| format!("monkey {}", i)))
        .collect::<Result<Vec<_>>>()?;

    ensure!(!monkeys.is_empty(), "no monkeys in input");
    for (i, monkey) in monkeys.iter().enumerate() {
        for target in [monkey.if_true, monkey.if_false] {
            ensure!(
                target < monkeys.len(),
                "monkey {} throws to invalid monkey {}",
                i,
                target
            );
        }
    }
    Ok(monkeys)
}

/// Product of the two highest inspection counts after `rounds` rounds.
fn monkey_business(mut monkeys: Vec<Monkey>, rounds: usize, relief: Relief) -> Result<u64> {
    let mut inspections = vec![0u64; monkeys.len()];

    for _ in 0..rounds {
        for i in 0..monkeys.len() {
            let items = std::mem::take(&mut monkeys[i].items);
            inspections[i] += items.len() as u64;

            let (operation, divisor) = (monkeys[i].operation, monkeys[i].divisor);
            let (if_true, if_false) = (monkeys[i].if_true, monkeys[i].if_false);
            for item in items {
                let worry = operation.apply(item)?;
                let worry = match relief {
                    Relief::DivideByThree => worry / 3,
                    Relief::Modulo(modulus) => worry % modulus,
                };
                let target = if worry % divisor == 0 { if_true } else { if_false };
                monkeys[target].items.push(worry);
            }
        }
    }

    inspections.sort_unstable_by(|a, b| b.cmp(a));
    Ok(inspections.iter().take(2).product())
}

pub fn day11(input: &str) -> Result<(u64, u64)> {
    let monkeys = parse_monkeys(input)?;
    let modulus = monkeys
        .iter()
        .map(|monkey| monkey.divisor)
        .fold(1, num::integer::lcm);

    Ok((
        monkey_business(monkeys.clone(), 20, Relief::DivideByThree)?,
        monkey_business(monkeys, 10_000, Relief::Modulo(modulus))?,
    ))
}
