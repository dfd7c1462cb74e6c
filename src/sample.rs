use iced::Point;

use crate::geometry::NODE_WIDTH;
use crate::graph::Graph;
use crate::node::NodeId;

const CASCADE_OFFSET: f32 = 30.0;
const CASCADE_ATTEMPTS: usize = 20;

/// Three nodes with a single link between the first two.
pub fn populate(graph: &mut Graph) {
    let node1 = graph.add_node("Node1");
    let out_abc = graph.add_output(node1, "OutABC");
    graph.set_position(node1, 10.0, 100.0);
    graph.add_input(node1, "InABC");

    let node2 = graph.add_node("Node2");
    graph.set_position(node2, 250.0, 150.0);
    graph.add_output(node2, "OutDDD");
    let in_fff = graph.add_input(node2, "InFFF");
    graph.add_input(node2, "InGGG");

    if let (Some(out), Some(input)) = (out_abc, in_fff) {
        graph.add_target(out, input);
    }

    let node3 = graph.add_node("Node3");
    graph.add_output(node3, "OutHHH");
    graph.set_position(node3, 10.0, 300.0);
}

/// A fresh node with one input and one output, placed where it does not sit
/// exactly on top of another node.
pub fn add_default_node(graph: &mut Graph) -> NodeId {
    let position = free_position(graph, Point::ORIGIN);
    let id = graph.add_node("Node1");
    graph.add_input(id, "Input");
    graph.add_output(id, "Output");
    graph.set_position(id, position.x, position.y);
    id
}

fn free_position(graph: &Graph, mut pos: Point) -> Point {
    for _ in 0..CASCADE_ATTEMPTS {
        let overlaps = graph.nodes().any(|node| {
            let dx = (node.position().x - pos.x).abs();
            let dy = (node.position().y - pos.y).abs();
            dx < NODE_WIDTH * 0.25 && dy < CASCADE_OFFSET * 0.5
        });
        if !overlaps {
            break;
        }
        pos.x += CASCADE_OFFSET;
        pos.y += CASCADE_OFFSET;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plug::Plug;

    #[test]
    fn sample_graph_shape() {
        let mut graph = Graph::new();
        populate(&mut graph);
        assert_eq!(graph.len(), 3);

        let names: Vec<&str> = graph.nodes().map(|n| n.name()).collect();
        assert_eq!(names, vec!["Node1", "Node2", "Node3"]);

        let node1 = graph.nodes().next().unwrap();
        assert_eq!(node1.position(), Point::new(10.0, 100.0));
        assert_eq!(node1.rect().height, 50.0);
        let out = node1.outputs()[0].id();
        let targets = graph.targets_of(out);
        assert_eq!(targets.len(), 1);
        assert_eq!(graph.input(targets[0]).unwrap().name(), "InFFF");
    }

    #[test]
    fn default_nodes_cascade() {
        let mut graph = Graph::new();
        let a = add_default_node(&mut graph);
        let b = add_default_node(&mut graph);
        assert_eq!(graph.node(a).unwrap().position(), Point::ORIGIN);
        assert_eq!(graph.node(b).unwrap().position(), Point::new(30.0, 30.0));
        assert_eq!(graph.node(b).unwrap().plug_count(), 2);
    }
}
