use smartscript::{parse, render, Element, ErrorKind, ForLoopNode, Node};

fn kind(input: &str) -> ErrorKind {
    parse(input).unwrap_err().kind()
}

fn for_loop(doc: &Node, index: usize) -> &ForLoopNode {
    doc.child(index)
        .and_then(Node::as_for_loop)
        .expect("expected a FOR loop")
}

fn echo(doc: &Node, index: usize) -> &[Element] {
    doc.child(index)
        .and_then(Node::elements)
        .expect("expected an echo tag")
}

#[test]
fn test_empty_body() {
    let doc = parse("").unwrap();
    assert_eq!(doc.number_of_children(), 0);
    assert_eq!(doc.depth(), 0);
    assert!(doc.child(0).is_none());
}

#[test]
fn test_only_whitespace_content() {
    let doc = parse("   \r\n\t        ").unwrap();
    assert_eq!(doc.number_of_children(), 1);
    assert_eq!(doc.child(0).and_then(Node::text), Some("   \r\n\t        "));
}

#[test]
fn test_body_starting_with_tag() {
    let doc = parse("{$ FOR i 1 10 1 $} {$END$}").unwrap();
    let node = for_loop(&doc, 0);

    assert_eq!(node.variable, Element::variable("i"));
    assert_eq!(node.start, Element::ConstantInteger(1));
    assert_eq!(node.end, Element::ConstantInteger(10));
    assert_eq!(node.step, Some(Element::ConstantInteger(1)));
    assert_eq!(node.children, vec![Node::text_node(" ")]);
}

#[test]
fn test_for_with_three_elements() {
    let doc = parse("{$FOR i 1 10$} {$END$}").unwrap();
    let node = for_loop(&doc, 0);

    assert_eq!(node.variable, Element::variable("i"));
    assert_eq!(node.start, Element::ConstantInteger(1));
    assert_eq!(node.end, Element::ConstantInteger(10));
    assert_eq!(node.step, None);
}

#[test]
fn test_empty_tag() {
    assert_eq!(kind("{$$}"), ErrorKind::EmptyTag);
}

#[test]
fn test_empty_for_tag() {
    assert_eq!(kind("{$FOR$} {$END$}"), ErrorKind::EmptyForTag);
}

#[test]
fn test_empty_echo_tag() {
    let doc = parse("{$=    $}").unwrap();
    assert_eq!(echo(&doc, 0), &[] as &[Element]);
}

#[test]
fn test_invalid_escape() {
    assert_eq!(kind("This is \\a letter"), ErrorKind::MalformedEscape);
}

#[test]
fn test_invalid_string_escape() {
    assert_eq!(
        kind("{$FOR a 10 \"\\abc\" -10 $} {$END$}"),
        ErrorKind::InvalidStringEscape
    );
}

#[test]
fn test_invalid_escape_ending() {
    assert_eq!(kind("This is regular text.\\"), ErrorKind::UnterminatedEscape);
}

#[test]
fn test_invalid_string_escape_ending() {
    assert_eq!(
        kind("{$FOR a 10 \"abc\\\" -10 $} {$END$}"),
        ErrorKind::UnterminatedString
    );
}

#[test]
fn test_string_cannot_cross_tag_end() {
    let err = parse("text {$= \"abc $} x\" $}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnterminatedString);
    assert_eq!(err.position(), Some((1, 10)));

    let doc = parse("{$= \"abc $ } x\" $}").unwrap();
    assert_eq!(echo(&doc, 0), &[Element::string("abc $ } x")]);
}

#[test]
fn test_valid_escape() {
    let doc = parse("This is \\{$ a {completely} valid text\\\\.").unwrap();
    assert_eq!(doc.number_of_children(), 1);
    assert_eq!(
        doc.child(0).and_then(Node::text),
        Some("This is {$ a {completely} valid text\\.")
    );
}

#[test]
fn test_valid_string_escape() {
    let doc = parse("{$= \"Whitespace characters:  \\r\\n\\t\" $}").unwrap();
    assert_eq!(
        echo(&doc, 0),
        &[Element::string("Whitespace characters:  \r\n\t")]
    );
}

#[test]
fn test_invalid_variable_name() {
    assert_eq!(
        kind("{$FOR _invalidArgument 1 10 1 $} {$END$}"),
        ErrorKind::InvalidVariableName
    );
    assert_eq!(kind("{$FOR _x 1 10$}{$END$}"), ErrorKind::InvalidVariableName);
}

#[test]
fn test_invalid_function_name() {
    assert_eq!(
        kind("{$= i i * @@invalidFunction $}"),
        ErrorKind::InvalidFunctionName
    );
}

#[test]
fn test_invalid_number() {
    assert_eq!(kind("{$FOR i 1 10.0.0 1 $} {$END$}"), ErrorKind::InvalidNumber);
}

#[test]
fn test_invalid_operator() {
    assert_eq!(kind("{$= i i % @sin $}"), ErrorKind::UnexpectedToken);
}

#[test]
fn test_nested_string() {
    let doc = parse("{$= This is \"a string\" and this is \"a \\\"nested\\\" string\" $}").unwrap();
    let elements = echo(&doc, 0);

    assert_eq!(elements.len(), 7);
    assert_eq!(elements[2], Element::string("a string"));
    assert_eq!(elements[6], Element::string("a \"nested\" string"));
}

#[test]
fn test_tag_after_tag() {
    let doc = parse("{$= a_variable * $}{$= variable2 @func $}").unwrap();
    assert_eq!(doc.number_of_children(), 2);

    assert_eq!(
        echo(&doc, 0),
        &[Element::variable("a_variable"), Element::Operator('*')]
    );
    assert_eq!(
        echo(&doc, 1),
        &[Element::variable("variable2"), Element::function("@func")]
    );
}

#[test]
fn test_keep_string_whitespaces() {
    let doc = parse("{$= \"A    string    constant\" $}").unwrap();
    let elements = echo(&doc, 0);

    assert_eq!(elements, &[Element::string("A    string    constant")]);
    assert_eq!(elements[0].as_text(), "\"A    string    constant\"");
}

#[test]
fn test_large_number_constant() {
    let doc = parse("{$FOR i 1 12345678912123123432123 1 $} {$END$}").unwrap();
    let node = for_loop(&doc, 0);
    assert_eq!(node.end, Element::ConstantDouble(12345678912123123432123.0));
}

#[test]
fn test_large_number_in_echo() {
    let doc = parse("{$= 99999999999999999999 $}").unwrap();
    assert_eq!(echo(&doc, 0), &[Element::ConstantDouble(1e20)]);
}

#[test]
fn test_negative_number_constant() {
    let doc = parse("{$FOR i -1 -3.13 -0.01 $} {$END$}").unwrap();
    let node = for_loop(&doc, 0);

    assert_eq!(node.start, Element::ConstantInteger(-1));
    assert_eq!(node.end, Element::ConstantDouble(-3.13));
    assert_eq!(node.step, Some(Element::ConstantDouble(-0.01)));
}

#[test]
fn test_no_whitespaces_echo() {
    let doc = parse("{$=i*i+212$}").unwrap();
    assert_eq!(
        echo(&doc, 0),
        &[
            Element::variable("i"),
            Element::Operator('*'),
            Element::variable("i"),
            Element::Operator('+'),
            Element::ConstantInteger(212),
        ]
    );
}

#[test]
fn test_unbalanced_loops() {
    assert_eq!(kind("{$END$}"), ErrorKind::UnmatchedEnd);
    assert_eq!(kind("{$FOR i 1 2$} body"), ErrorKind::UnclosedForLoop);
}

#[test]
fn test_errors_point_at_the_offending_construct() {
    let err = parse("line one\nline two {$= \"ok\" %$}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedToken);
    assert_eq!(err.position(), Some((2, 19)));
    assert!(err.to_string().contains("'%'"));
}

#[test]
fn test_combined_input() {
    let text = concat!(
        "This is sample text.",
        "{$ FOR i 1 10 $}\n",
        "  This is {$= i $}-th time this message is generated.\n",
        "{$END$}\n",
        "{$FOR i 0 10 2 $}\n",
        "  sin({$=i$}^2) = {$= i i * @sin \"0.000\" @decfmt $}\n",
        "{$END$}\n",
        "\n",
        "{$= \"text/plain\" @setMimeType $}\n",
        "Računam sumu brojeva:\n",
        "{$=     \"a=\" \"a\" 0 @paramGet \", b=\" \"b\" 0 @paramGet \",  rezultat=\" \"a\" 0\n",
        "@paramGet \"b\" 0 @paramGet + $}\n",
        "\n\n",
        "{$= \"text/plain\" @setMimeType $}\n",
        "Ovaj dokument pozvan je sljedeći broj puta:\n",
        "{$= \"brojPoziva\" \"1\" @pparamGet @dup 1 + \"brojPoziva\" @pparamSet $}\n",
        "\n",
        "{$= \"text/plain\" @setMimeType $}Prvih 10 fibonaccijevih brojeva je:\n",
        "{$= \"0\" \"a\" @tparamSet\n",
        "   \"1\" \"b\" @tparamSet\n",
        "   \"0\r\n1\r\n\" $}{$FOR i 3 10 1$}{$=\n",
        "\"b\" \"0\" @tparamGet @dup\n",
        "\"a\" \"0\" @tparamGet +\n",
        "\"b\" @tparamSet \"a\" @tparamSet\n",
        "\"b\" \"0\" @tparamGet \"\\r\\n\"\n",
        "$}{$END$}",
    );

    let document = parse(text).unwrap();
    let body = render(&document);

    let document2 = parse(&body).unwrap();
    let body2 = render(&document2);

    assert_eq!(body, body2);
    assert_eq!(document, document2);

    let fibonacci = document
        .children()
        .iter()
        .rev()
        .find_map(Node::as_for_loop)
        .unwrap();
    assert_eq!(fibonacci.step, Some(Element::ConstantInteger(1)));
    assert_eq!(fibonacci.children.len(), 1);
}
