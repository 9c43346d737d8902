use hackasm::{assemble, Error};

fn case(source: &str, expect: &[&str]) {
    let lines: Vec<&str> = source.lines().collect();
    let words = assemble(&lines).unwrap();
    println!("{source}");
    for (idx, word) in words.iter().enumerate() {
        println!("{idx:>2}: {word}");
    }
    assert_eq!(words, expect);
}

#[test]
fn max_program() {
    case(
        "\
// Computes R2 = max(R0, R1)
@R0
D=M
@R1
D=D-M
@OUTPUT_FIRST
D;JGT
@R1
D=M
@OUTPUT_D
0;JMP
(OUTPUT_FIRST)
@R0
D=M
(OUTPUT_D)
@R2
M=D
(INFINITE_LOOP)
@INFINITE_LOOP
0;JMP",
        &[
            "0000000000000000",
            "1111110000010000",
            "0000000000000001",
            "1111010011010000",
            "0000000000001010",
            "1110001100000001",
            "0000000000000001",
            "1111110000010000",
            "0000000000001100",
            "1110101010000111",
            "0000000000000000",
            "1111110000010000",
            "0000000000000010",
            "1110001100001000",
            "0000000000001110",
            "1110101010000111",
        ],
    );
}

#[test]
fn variables_and_labels_share_the_table() {
    // `i` and `sum` allocate from 16 in first-occurrence order while
    // `LOOP`/`END` resolve to instruction addresses.
    let source = [
        "@i", "M=0", "@sum", "M=0", "(LOOP)", "@i", "D=M", "@100", "D=D-A", "@END", "D;JGT", "@i",
        "D=M", "@sum", "M=D+M", "@i", "M=M+1", "@LOOP", "0;JMP", "(END)", "@END", "0;JMP",
    ];
    let words = assemble(&source).unwrap();
    assert_eq!(words[0], format!("{:016b}", 16)); // @i
    assert_eq!(words[2], format!("{:016b}", 17)); // @sum
    assert_eq!(words[4], format!("{:016b}", 16)); // @i again
    assert_eq!(words[8], format!("{:016b}", 18)); // @END -> label, not var
    assert_eq!(words[18], format!("{:016b}", 18)); // @END after (END)
    assert_eq!(words[16], format!("{:016b}", 4)); // @LOOP
    assert_eq!(words.len(), 20);
}

#[test]
fn screen_and_keyboard() {
    case(
        "@SCREEN\nM=-1\n@KBD\nD=M",
        &[
            "0100000000000000",
            "1110111010001000",
            "0110000000000000",
            "1111110000010000",
        ],
    );
}

#[test]
fn report_errors_with_line() {
    let lines = ["@1", "D=A", "", "M=D+D"];
    let (idx, err) = assemble(&lines).unwrap_err();
    assert_eq!(idx, 3);
    assert!(matches!(err, Error::UnknownComp(_)));

    let lines = ["(A)", "@0", "(A)"];
    let (idx, err) = assemble(&lines).unwrap_err();
    assert_eq!(idx, 2);
    assert!(matches!(err, Error::DuplicateLabel(_)));
}
