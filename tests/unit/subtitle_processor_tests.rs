/*!
 * Tests for SRT and SMI line rewriting
 */

use subadjust::subtitle_processor::{
    Adjustment, RewriteStats, SubtitleFormat, rewrite, rewrite_smi, rewrite_srt,
};
use crate::common;

/// Zero offsets leave a CRLF SRT file byte-identical
#[test]
fn test_rewrite_srt_withZeroOffsets_shouldReturnSameLines() {
    let input = common::lines(
        "1\r\n00:00:01,000 --> 00:00:04,000\r\nFirst\r\n\r\n2\r\n00:59:59,999 --> 01:00:00,000\r\nSecond\r\n",
    );

    assert_eq!(common::text(&rewrite_srt(&input, 0, 0)), input);
}

/// A negative offset moves both ends of the range
#[test]
fn test_rewrite_srt_withNegativeOffset_shouldShiftBothTimestamps() {
    let output = common::text(&rewrite_srt(&["00:00:01,000 --> 00:00:02,500"], 0, -500));
    assert_eq!(output, vec!["00:00:00,500 --> 00:00:02,000\r\n"]);
}

/// Offsets carry across minute and hour boundaries
#[test]
fn test_rewrite_srt_withCarry_shouldNormalizeFields() {
    let output = common::text(&rewrite_srt(&["00:59:59,900 --> 01:59:59,999\n"], 0, 3_661_100));
    assert_eq!(output, vec!["02:01:01,000 --> 03:01:01,099\r\n"]);
}

/// Anything after the end timestamp is not carried over
#[test]
fn test_rewrite_srt_withTrailingCoordinates_shouldEmitBareRange() {
    let output = common::text(&rewrite_srt(&["00:00:01,000 --> 00:00:02,000 X1:40 X2:600\r\n"], 0, 0));
    assert_eq!(output, vec!["00:00:01,000 --> 00:00:02,000\r\n"]);
}

/// A gap in the numbering is closed
#[test]
fn test_rewrite_srt_withSectionGap_shouldRepairToConsecutive() {
    let output = common::text(&rewrite_srt(&["1\n", "2\n", "5\n"], 0, 0));
    assert_eq!(output, vec!["1\r\n", "2\r\n", "3\r\n"]);
}

/// Consecutive sections only move by the offset
#[test]
fn test_rewrite_srt_withSectionOffset_shouldShiftEveryNumber() {
    assert_eq!(
        common::text(&rewrite_srt(&["1\n", "2\n", "3\n"], 10, 0)),
        vec!["11\r\n", "12\r\n", "13\r\n"]
    );
    assert_eq!(common::text(&rewrite_srt(&["5\n", "6\n"], -4, 0)), vec!["1\r\n", "2\r\n"]);
}

/// Out-of-order numbers follow the first emitted one
#[test]
fn test_rewrite_srt_withReorderedSections_shouldFollowFirstNumber() {
    assert_eq!(
        common::text(&rewrite_srt(&["3\n", "1\n", "2\n"], 0, 0)),
        vec!["3\r\n", "4\r\n", "5\r\n"]
    );
}

/// Whitespace around a section number is dropped
#[test]
fn test_rewrite_srt_withPaddedSection_shouldEmitBareNumber() {
    assert_eq!(common::text(&rewrite_srt(&["  7 \t\n"], 0, 0)), vec!["7\r\n"]);
}

/// Text, blank lines and malformed timings pass through untouched
#[test]
fn test_rewrite_srt_withUnrecognizedLines_shouldPassThrough() {
    let input = vec![
        "Hello world\n",
        "\n",
        "0:00:01,000 --> 0:00:02,000\n",
        "00:00:01.000 --> 00:00:02.000\r\n",
        "<i>1</i>\n",
        "no newline",
    ];

    assert_eq!(common::text(&rewrite_srt(&input, 3, 1_000)), input);
}

/// Text lines between sections do not disturb the counter
#[test]
fn test_rewrite_srt_withFullDocument_shouldShiftAndRenumber() {
    let input = common::lines(common::SAMPLE_SRT);
    let output = common::text(&rewrite_srt(&input, 0, 2_000));

    let expected = common::lines(
        "1\r\n00:00:03,000 --> 00:00:06,000\r\nThis is a test subtitle.\r\n\r\n2\r\n00:00:07,000 --> 00:00:11,000\r\nIt contains multiple entries.\r\n\r\n3\r\n00:00:12,000 --> 00:00:16,000\r\nFor testing purposes.\r\n",
    );
    assert_eq!(output, expected);
}

/// The SYNC value is shifted as a plain number
#[test]
fn test_rewrite_smi_withSyncMarker_shouldAddOffset() {
    assert_eq!(common::text(&rewrite_smi(&["<SYNC Start=1000>"], 2_000)), vec!["<SYNC Start=3000>\r\n"]);
    assert_eq!(common::text(&rewrite_smi(&["<SYNC Start=100>\n"], -500)), vec!["<SYNC Start=-400>\r\n"]);
}

/// Only the marker survives on a rewritten line
#[test]
fn test_rewrite_smi_withInlineParagraph_shouldKeepOnlyMarker() {
    assert_eq!(
        common::text(&rewrite_smi(&["<SYNC Start=1000><P Class=KRCC>Hi\r\n"], 1)),
        vec!["<SYNC Start=1001>\r\n"]
    );
}

/// Lines without a marker keep their text and terminator
#[test]
fn test_rewrite_smi_withOtherLines_shouldPassThrough() {
    let input = vec![
        "<SAMI>\n",
        "<P Class=ENCC>Hello world\r\n",
        "<sync start=1000>\n",
        "00:00:01,000 --> 00:00:02,000\n",
        "12\n",
    ];

    assert_eq!(common::text(&rewrite_smi(&input, 5_000)), input);
}

/// Plain subtitle text is untouched in both formats
#[test]
fn test_rewrite_withPlainText_shouldPassThroughBothFormats() {
    let adjustment = Adjustment::new(1_234, 5);
    for format in [SubtitleFormat::Srt, SubtitleFormat::Smi] {
        let (output, stats) = rewrite(format, &["Hello world\n"], &adjustment);
        assert_eq!(common::text(&output), vec!["Hello world\n"]);
        assert_eq!(stats.lines_passed_through, 1);
    }
}

/// SMI files ignore the section offset
#[test]
fn test_rewrite_withSmiFormat_shouldIgnoreSectionOffset() {
    let input = common::lines(common::SAMPLE_SMI);
    let (output, stats) = rewrite(SubtitleFormat::Smi, &input, &Adjustment::new(-1_000, 7));
    let output = common::text(&output);

    assert_eq!(output[2], "<SYNC Start=0>\r\n");
    assert_eq!(output[4], "<SYNC Start=1500>\r\n");
    assert_eq!(
        stats,
        RewriteStats {
            timestamps_shifted: 2,
            sections_renumbered: 0,
            sections_repaired: 0,
            lines_passed_through: 6,
        }
    );
}

/// The SRT counters reflect the repaired section
#[test]
fn test_rewrite_withSrtFormat_shouldReportStats() {
    let input = common::lines(common::SAMPLE_SRT);
    let (_, stats) = rewrite(SubtitleFormat::Srt, &input, &Adjustment::default());

    assert_eq!(stats.timestamps_shifted, 3);
    assert_eq!(stats.sections_renumbered, 3);
    assert_eq!(stats.sections_repaired, 1);
    assert_eq!(stats.total_lines(), input.len());
}

/// Non-UTF-8 text lines come back byte for byte
#[test]
fn test_rewrite_srt_withLatin1Text_shouldPreserveBytes() {
    let input: [&[u8]; 3] = [
        b"1\r\n",
        b"00:00:01,000 --> 00:00:02,000\r\n",
        b"Caf\xe9\r\n",
    ];
    let output = rewrite_srt(&input, 0, 1_000);

    assert_eq!(output[0], b"1\r\n");
    assert_eq!(output[1], b"00:00:02,000 --> 00:00:03,000\r\n");
    assert_eq!(output[2], b"Caf\xe9\r\n");
}
