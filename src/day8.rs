use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use log::debug;
use num::integer::lcm;

const PART_ONE_START: &str = "AAA";
const PART_ONE_EXIT: &str = "ZZZ";
const START_SUFFIX: &str = "A";
const EXIT_SUFFIX: &str = "Z";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

#[derive(Debug)]
struct Network {
    nodes: HashMap<String, (String, String)>,
}

impl Network {
    fn step(&self, label: &str, direction: Direction) -> anyhow::Result<&str> {
        let (left, right) = self
            .nodes
            .get(label)
            .with_context(|| format!("node {label:?} not in network"))?;
        Ok(match direction {
            Direction::Left => left,
            Direction::Right => right,
        })
    }

    fn labels_ending_with(&self, suffix: &str) -> Vec<&str> {
        let mut labels: Vec<&str> = self
            .nodes
            .keys()
            .filter(|label| label.ends_with(suffix))
            .map(String::as_str)
            .collect();
        // Map iteration order is arbitrary; keep walker order stable
        labels.sort_unstable();
        labels
    }
}

fn parse_instructions(line: &str) -> anyhow::Result<Vec<Direction>> {
    let instructions: Vec<Direction> = line
        .chars()
        .map(|c| match c {
            'L' => Ok(Direction::Left),
            'R' => Ok(Direction::Right),
            other => Err(anyhow::anyhow!("unknown instruction {other:?}")),
        })
        .collect::<anyhow::Result<_>>()?;
    if instructions.is_empty() {
        bail!("empty instruction sequence");
    }
    Ok(instructions)
}

// "AAA = (BBB, CCC)", tolerant of whitespace variation
fn parse_node(line: &str) -> anyhow::Result<(String, (String, String))> {
    let (label, neighbors_str) = line
        .split_once('=')
        .with_context(|| format!("no '=' in node line {line:?}"))?;
    let neighbors_str = neighbors_str
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .with_context(|| format!("neighbors not parenthesized in {line:?}"))?;
    let (left, right) = neighbors_str
        .split_once(',')
        .with_context(|| format!("no ',' between neighbors in {line:?}"))?;
    Ok((
        label.trim().to_string(),
        (left.trim().to_string(), right.trim().to_string()),
    ))
}

fn parse_network(contents: &str) -> anyhow::Result<(Network, Vec<Direction>)> {
    let mut lines = contents.lines();
    let instructions = parse_instructions(
        lines
            .next()
            .context("missing instruction line")?
            .trim(),
    )?;

    let mut nodes = HashMap::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (label, neighbors) = parse_node(line)?;
        nodes.insert(label, neighbors);
    }
    Ok((Network { nodes }, instructions))
}

fn walk_to_exit(
    network: &Network,
    instructions: &[Direction],
    start: &str,
    exit_suffix: &str,
) -> anyhow::Result<u64> {
    // There are only nodes * instructions distinct (node, phase) states;
    // walking past that count without exiting means the walk is cycling
    // and no exit is reachable.
    let max_steps = (network.nodes.len() * instructions.len()) as u64;
    let mut current = start;
    let mut steps = 0u64;
    while !current.ends_with(exit_suffix) {
        if steps >= max_steps {
            bail!("no node ending in {exit_suffix:?} reachable from {start:?}");
        }
        let direction = instructions[steps as usize % instructions.len()];
        current = network.step(current, direction)?;
        steps += 1;
    }
    Ok(steps)
}

/// All walkers reach their exits simultaneously for the first time after
/// the least common multiple of their individual step counts. This relies
/// on each walker's first exit arrival coinciding with the start of its
/// cycle, which holds for the puzzle inputs.
fn multi_walk_lcm(
    network: &Network,
    instructions: &[Direction],
    starts: &[&str],
    exit_suffix: &str,
) -> anyhow::Result<u64> {
    let mut combined = 1;
    for start in starts {
        let steps = walk_to_exit(network, instructions, start, exit_suffix)?;
        debug!("walker from {start} reaches an exit after {steps} steps");
        combined = lcm(combined, steps);
    }
    Ok(combined)
}

pub fn run(input: &Path) -> anyhow::Result<()> {
    let contents = fs::read_to_string(input)
        .with_context(|| format!("unable to read {}", input.display()))?;
    let (network, instructions) = parse_network(&contents)?;
    debug!(
        "parsed {} nodes and {} instructions",
        network.nodes.len(),
        instructions.len()
    );

    let steps = walk_to_exit(&network, &instructions, PART_ONE_START, PART_ONE_EXIT)?;
    println!("Steps from {PART_ONE_START} -> {PART_ONE_EXIT}: {steps}");

    let starts = network.labels_ending_with(START_SUFFIX);
    let steps = multi_walk_lcm(&network, &instructions, &starts, EXIT_SUFFIX)?;
    println!("Steps from {starts:?} -> exit nodes: {steps}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LOOPED_SAMPLE: &str = "\
LLR

AAA = (BBB, BBB)
BBB = (AAA, ZZZ)
ZZZ = (ZZZ, ZZZ)
";

    const MULTI_SAMPLE: &str = "\
LR

11A = (11B, XXX)
11B = (XXX, 11Z)
11Z = (11B, XXX)
22A = (22B, XXX)
22B = (22C, 22C)
22C = (22Z, 22Z)
22Z = (22B, 22B)
XXX = (XXX, XXX)
";

    #[test]
    fn test_parse_instructions() {
        let instructions = parse_instructions("LLR").unwrap();
        assert_eq!(
            instructions,
            vec![Direction::Left, Direction::Left, Direction::Right]
        );
    }

    #[test]
    fn test_parse_instructions_rejects_unknown() {
        assert!(parse_instructions("LQR").is_err());
        assert!(parse_instructions("").is_err());
    }

    #[test]
    fn test_parse_node() {
        let (label, (left, right)) = parse_node("AAA = (BBB, CCC)").unwrap();
        assert_eq!(label, "AAA");
        assert_eq!(left, "BBB");
        assert_eq!(right, "CCC");
    }

    #[test]
    fn test_parse_node_malformed() {
        assert!(parse_node("AAA (BBB, CCC)").is_err());
        assert!(parse_node("AAA = BBB, CCC").is_err());
        assert!(parse_node("AAA = (BBB CCC)").is_err());
    }

    #[test]
    fn test_walk_repeats_instructions() {
        let (network, instructions) = parse_network(LOOPED_SAMPLE).unwrap();
        let steps = walk_to_exit(&network, &instructions, "AAA", "ZZZ").unwrap();
        assert_eq!(steps, 6);
    }

    #[test]
    fn test_walk_from_exit_takes_no_steps() {
        let (network, instructions) = parse_network(LOOPED_SAMPLE).unwrap();
        let steps = walk_to_exit(&network, &instructions, "ZZZ", "ZZZ").unwrap();
        assert_eq!(steps, 0);
    }

    #[test]
    fn test_walk_unreachable_exit_fails() {
        let (network, instructions) = parse_network("LR\n\nAAA = (AAA, AAA)\n").unwrap();
        assert!(walk_to_exit(&network, &instructions, "AAA", "ZZZ").is_err());
    }

    #[test]
    fn test_walk_dangling_node_fails() {
        let (network, instructions) = parse_network("LL\n\nAAA = (BBB, BBB)\n").unwrap();
        assert!(walk_to_exit(&network, &instructions, "AAA", "ZZZ").is_err());
    }

    #[test]
    fn test_starting_labels_sorted() {
        let (network, _) = parse_network(MULTI_SAMPLE).unwrap();
        assert_eq!(network.labels_ending_with("A"), vec!["11A", "22A"]);
    }

    #[test]
    fn test_multi_walk_lcm() {
        let (network, instructions) = parse_network(MULTI_SAMPLE).unwrap();
        let starts = network.labels_ending_with("A");
        let steps = multi_walk_lcm(&network, &instructions, &starts, "Z").unwrap();
        // individual walkers exit after 2 and 3 steps
        assert_eq!(steps, 6);
    }

    #[test]
    fn test_run_reads_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{LOOPED_SAMPLE}").unwrap();
        run(file.path()).unwrap();
    }

    #[test]
    fn test_run_missing_file() {
        assert!(run(Path::new("inputs/no-such-file.txt")).is_err());
    }
}
