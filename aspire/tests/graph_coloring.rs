use aspire::{
    AspResult, Assert, Atom, ConditionalLiteral, FieldKind, Program, Record, Schema, SolveResult,
    Term, When,
};
use std::sync::Arc;

fn node() -> Arc<Schema> {
    Schema::builder("node").field("id", FieldKind::Int).build().unwrap()
}

fn edge() -> Arc<Schema> {
    Schema::builder("edge")
        .field("from", FieldKind::Int)
        .field("to", FieldKind::Int)
        .build()
        .unwrap()
}

fn color() -> Arc<Schema> {
    Schema::builder("color").field("name", FieldKind::Str).build().unwrap()
}

fn assign() -> Arc<Schema> {
    Schema::builder("assign")
        .field("node", FieldKind::Atom(node()))
        .field("color", FieldKind::Atom(color()))
        .build()
        .unwrap()
}

#[derive(Debug, PartialEq)]
struct Assignment {
    node: i64,
    color: String,
}

impl Record for Assignment {
    fn schema() -> Arc<Schema> {
        assign()
    }

    fn from_atom(atom: &Atom) -> AspResult<Self> {
        Ok(Assignment {
            node: atom.nested("node")?.int("id")?,
            color: atom.nested("color")?.string("name")?.to_string(),
        })
    }

    fn to_atom(&self) -> AspResult<Atom> {
        Self::schema()
            .atom()
            .with("node", node().atom().with("id", self.node).build()?)
            .with("color", color().atom().with("name", self.color.as_str()).build()?)
            .build()
    }
}

fn coloring_program() -> AspResult<Program> {
    let (node, edge, color, assign) = (node(), edge(), color(), assign());
    let mut program = Program::new();

    for id in 1..=3 {
        program.add(node.atom().with("id", id).build()?);
    }
    program.add(edge.atom().with("from", 1).with("to", 2).build()?);
    program.add(edge.atom().with("from", 2).with("to", 3).build()?);
    for name in ["red", "green"] {
        program.add(color.atom().with("name", name).build()?);
    }

    let n = Term::var("N")?;
    let c = Term::var("C")?;
    let some_node = node.atom().with("id", &n).build()?;
    let some_color = color.atom().with("name", &c).build()?;
    let choice = assign
        .atom()
        .with("node", &some_node)
        .with("color", &some_color)
        .build()?;
    let one_color = ConditionalLiteral::new().entry(&choice, [&some_color]);
    program.add(When::new(&some_node).guess(one_color, Some(Term::from(1)), None, None)?);

    let (a, b) = (Term::var("A")?, Term::var("B")?);
    let colored = |id: &Term| -> AspResult<Atom> {
        assign
            .atom()
            .with("node", node.atom().with("id", id).build()?)
            .with("color", &some_color)
            .build()
    };
    program.add(
        When::all([edge.atom().with("from", &a).with("to", &b).build()?])
            .and_also(colored(&a)?)
            .and_also(colored(&b)?)
            .never(),
    );

    let red = color.atom().with("name", "red").build()?;
    let red_node = assign.atom().with("node", &some_node).with("color", red).build()?;
    program.add(Assert::unconditional().when(red_node).otherwise(1, 1, [n]));

    Ok(program)
}

#[test]
fn test_coloring_program_text() {
    let text = coloring_program().unwrap().render().unwrap();
    insta::assert_snapshot!(text.trim_end(), @r###"
node(1).
node(2).
node(3).
edge(1, 2).
edge(2, 3).
color("red").
color("green").
{assign(node(VAR_N), color(VAR_C)) : color(VAR_C)} = 1 :- node(VAR_N).
 :- edge(VAR_A, VAR_B); assign(node(VAR_A), color(VAR_C)); assign(node(VAR_B), color(VAR_C)).
 :~ assign(node(VAR_N), color("red")). [1@1,VAR_N]
"###);
}

#[test]
fn test_coloring_answer_decodes_to_records() {
    let output = r#"{
      "Call": [{ "Witnesses": [
        { "Value": ["node(1)","node(2)","node(3)","assign(node(1),color(\"red\"))","assign(node(2),color(\"green\"))","assign(node(3),color(\"green\"))"], "Costs": [1] },
        { "Value": ["node(1)","node(2)","node(3)","assign(node(1),color(\"green\"))","assign(node(2),color(\"red\"))","assign(node(3),color(\"green\"))"], "Costs": [1] }
      ] }],
      "Result": "OPTIMUM FOUND"
    }"#;
    let result = SolveResult::parse(output).unwrap();
    let best = result.best_answer().unwrap();
    let mut assignments: Vec<Assignment> = best.records().unwrap();
    assignments.sort_by_key(|a| a.node);

    assert_eq!(
        assignments,
        vec![
            Assignment { node: 1, color: "green".to_string() },
            Assignment { node: 2, color: "red".to_string() },
            Assignment { node: 3, color: "green".to_string() },
        ]
    );
    assert!(best
        .contains(&assignments[1].to_atom().unwrap())
        .unwrap());
    assert_eq!(best.costs(), [1]);
}
