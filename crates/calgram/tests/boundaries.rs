//! Boundary cases for the accepted language and its derivations.

use calgram::{leftmost, recognize, rightmost, validate, Field, Rejection, Separator};
use rstest::rstest;

#[rstest]
#[case("05/12/2023", true)]
#[case("5/12/2023", false)]
#[case("00/12/2023", false)]
#[case("01/32/2023", false)]
#[case("12/31/2023", true)]
#[case("05-12-2023", true)]
#[case("05.12.2023", true)]
#[case("05/12-2023", false)]
#[case("13/12/2023", false)]
#[case("10/10/1010", true)]
#[case("09/09/0000", true)]
#[case("01/30/2023", true)]
#[case("01/20/2023", true)]
#[case("01/00/2023", false)]
#[case("05/12/202", false)]
#[case("05/12/20234", false)]
#[case("05 12 2023", false)]
#[case("05/12/2023 ", false)]
#[case("", false)]
fn test_membership(#[case] input: &str, #[case] expected: bool) {
    assert_eq!(validate(input), expected, "{input:?}");
}

#[rstest]
#[case("13/12/2023", Field::Month, "13")]
#[case("00/12/2023", Field::Month, "00")]
#[case("01/32/2023", Field::Day, "32")]
#[case("01/39/2023", Field::Day, "39")]
fn test_field_rejections(#[case] input: &str, #[case] field: Field, #[case] value: &str) {
    assert_eq!(
        recognize(input),
        Err(Rejection::Field {
            field,
            value: value.to_owned(),
        })
    );
}

#[rstest]
#[case("05/12/2023", Separator::Slash)]
#[case("05-12-2023", Separator::Dash)]
#[case("05.12.2023", Separator::Dot)]
fn test_separator_selects_start_alternative(#[case] input: &str, #[case] separator: Separator) {
    assert_eq!(recognize(input).unwrap().separator, separator);
    let sep = separator.as_char();
    let expected = format!("M{sep}D{sep}Y");
    assert_eq!(leftmost(input).unwrap().steps[1], expected);
    assert_eq!(rightmost(input).unwrap().steps[1], expected);
}

#[test]
fn test_end_to_end_scenario() {
    let input = "01/05/1999";
    assert!(validate(input));

    let derivation = leftmost(input).unwrap();
    assert_eq!(derivation.steps[..3], ["S", "M/D/Y", "0X/D/Y"]);
    assert_eq!(derivation.steps.last().map(String::as_str), Some(input));

    let tree = &derivation.tree;
    assert_eq!(tree.label(), 'S');
    assert_eq!(tree.children().len(), 5);
    let leaves: Vec<char> = tree.leaves().into_iter().map(|s| s.label()).collect();
    assert_eq!(leaves, ['0', '1', '/', '0', '5', '/', '1', '9', '9', '9']);
}
